//! Home page block visibility and ordering.

use crate::document::ValidationError;

use super::models::PageSection;

/// Flip `enabled` on one block.
pub fn toggle(mut sections: Vec<PageSection>, id: &str) -> Result<Vec<PageSection>, ValidationError> {
    let section = sections
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| ValidationError::invalid("id", format!("unknown page section `{id}`")))?;
    section.enabled = !section.enabled;
    Ok(sections)
}

/// Put the named blocks first, in the given sequence, followed by any
/// blocks not named (keeping their relative order), and renumber `order`
/// from 1.
pub fn reorder(sections: Vec<PageSection>, ids: &[String]) -> Result<Vec<PageSection>, ValidationError> {
    let mut remaining = sort_by_order(sections);
    let mut out = Vec::with_capacity(remaining.len());
    for id in ids {
        let pos = remaining
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| ValidationError::invalid("ids", format!("unknown or repeated page section `{id}`")))?;
        out.push(remaining.remove(pos));
    }
    out.extend(remaining);
    for (section, order) in out.iter_mut().zip(1u32..) {
        section.order = order;
    }
    Ok(out)
}

/// Enabled blocks in display order.
pub fn visible(sections: &[PageSection]) -> Vec<PageSection> {
    sort_by_order(sections.iter().filter(|s| s.enabled).cloned().collect())
}

fn sort_by_order(mut sections: Vec<PageSection>) -> Vec<PageSection> {
    sections.sort_by_key(|s| s.order);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, order: u32) -> PageSection {
        PageSection {
            id: id.into(),
            name: id.into(),
            title: id.into(),
            enabled: true,
            order,
        }
    }

    fn ids(sections: &[PageSection]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn toggle_flips_one_section() {
        let sections = vec![section("hero", 1), section("about", 2)];
        let toggled = toggle(sections, "about").unwrap();
        assert!(toggled[0].enabled);
        assert!(!toggled[1].enabled);
        assert!(toggle(toggled, "nope").is_err());
    }

    #[test]
    fn reorder_renumbers_from_one() {
        let sections = vec![section("hero", 1), section("about", 2), section("services", 3)];
        let out = reorder(sections, &["services".into(), "hero".into()]).unwrap();
        assert_eq!(ids(&out), vec!["services", "hero", "about"]);
        let orders: Vec<u32> = out.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn reorder_rejects_duplicates() {
        let sections = vec![section("hero", 1), section("about", 2)];
        assert!(reorder(sections, &["hero".into(), "hero".into()]).is_err());
    }

    #[test]
    fn visible_skips_disabled_and_sorts() {
        let mut sections = vec![section("contact", 6), section("hero", 1), section("clients", 4)];
        sections[2].enabled = false;
        assert_eq!(ids(&visible(&sections)), vec!["hero", "contact"]);
    }
}
