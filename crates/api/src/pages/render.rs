//! Render strategies for editable text.
//!
//! Pages never branch on admin state themselves. They describe each
//! editable value as a [`Field`] and hand it to the request's [`Renderer`]:
//! visitors get plain markup, admins get the same markup wrapped with the
//! `data-edit-*` attributes the admin UI attaches inline editors to.

use advisory_site_core::content::binding::FieldPath;
use advisory_site_core::content::Section;
use advisory_site_core::editor::{Capability, EditMode, InlineEditor};
use advisory_site_core::Locale;
use maud::{html, Markup};

/// Where an editable value lives.
#[derive(Debug, Clone)]
pub struct Field {
    pub section: Section,
    pub locale: Locale,
    pub path: FieldPath,
    pub mode: EditMode,
}

impl Field {
    pub fn line(section: Section, locale: Locale, name: &str) -> Self {
        Self {
            section,
            locale,
            path: FieldPath::field(name),
            mode: EditMode::SingleLine,
        }
    }

    pub fn block(section: Section, locale: Locale, name: &str) -> Self {
        Self {
            mode: EditMode::MultiLine,
            ..Self::line(section, locale, name)
        }
    }

    pub fn item(section: Section, locale: Locale, list: &str, item_id: &str, name: &str) -> Self {
        Self {
            section,
            locale,
            path: FieldPath::item(list, item_id, name),
            mode: EditMode::SingleLine,
        }
    }

    pub fn multiline(mut self) -> Self {
        self.mode = EditMode::MultiLine;
        self
    }

    fn mode_name(&self) -> &'static str {
        match self.mode {
            EditMode::SingleLine => "single",
            EditMode::MultiLine => "multi",
        }
    }
}

pub trait Renderer: Send + Sync {
    fn capability(&self) -> Capability;

    fn text(&self, field: &Field, value: &str) -> Markup;

    /// An image whose url is stored at `field`.
    fn image(&self, field: &Field, url: &str, alt: &str) -> Markup;
}

pub fn renderer_for(capability: Capability) -> Box<dyn Renderer> {
    match capability {
        Capability::Viewer => Box::new(ViewerRenderer),
        Capability::Editor => Box::new(EditorRenderer),
    }
}

/// Line breaks in stored text become `<br>`.
pub fn lines(value: &str) -> Markup {
    html! {
        @for (i, line) in value.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ViewerRenderer;

impl Renderer for ViewerRenderer {
    fn capability(&self) -> Capability {
        Capability::Viewer
    }

    fn text(&self, field: &Field, value: &str) -> Markup {
        match field.mode {
            EditMode::SingleLine => html! { (value) },
            EditMode::MultiLine => lines(value),
        }
    }

    fn image(&self, _field: &Field, url: &str, alt: &str) -> Markup {
        html! {
            @if !url.trim().is_empty() {
                img src=(url) alt=(alt) loading="lazy";
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EditorRenderer;

const EDIT_PLACEHOLDER: &str = "Click to edit";

impl Renderer for EditorRenderer {
    fn capability(&self) -> Capability {
        Capability::Editor
    }

    fn text(&self, field: &Field, value: &str) -> Markup {
        let editor = InlineEditor::new(value, EDIT_PLACEHOLDER, field.mode);
        html! {
            span.editable
                data-edit-section=(field.section.name())
                data-edit-locale=(field.locale.code())
                data-edit-field=(field.path.to_string())
                data-edit-mode=(field.mode_name())
                data-edit-empty[value.trim().is_empty()]
            {
                @match field.mode {
                    EditMode::SingleLine => { (editor.display()) }
                    EditMode::MultiLine => { (lines(editor.display())) }
                }
            }
        }
    }

    fn image(&self, field: &Field, url: &str, alt: &str) -> Markup {
        html! {
            span.editable-image
                data-edit-section=(field.section.name())
                data-edit-locale=(field.locale.code())
                data-edit-field=(field.path.to_string())
                data-edit-kind="image"
            {
                @if url.trim().is_empty() {
                    span.image-placeholder { "Upload image" }
                } @else {
                    img src=(url) alt=(alt) loading="lazy";
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_renders_plain_escaped_text() {
        let field = Field::line(Section::Hero, Locale::En, "title");
        let out = ViewerRenderer.text(&field, "Tax & <Growth>").into_string();
        assert_eq!(out, "Tax &amp; &lt;Growth&gt;");

        let field = Field::block(Section::About, Locale::En, "description");
        assert_eq!(ViewerRenderer.text(&field, "a\nb").into_string(), "a<br>b");
        assert_eq!(ViewerRenderer.image(&field, "", "x").into_string(), "");
    }

    #[test]
    fn editor_marks_fields_for_inline_editing() {
        let field = Field::item(Section::Services, Locale::He, "services", "svc_1", "title");
        let out = EditorRenderer.text(&field, "ייעוץ").into_string();
        assert!(out.contains(r#"data-edit-section="services""#), "{out}");
        assert!(out.contains(r#"data-edit-locale="he""#), "{out}");
        assert!(out.contains(r#"data-edit-field="services.svc_1.title""#), "{out}");
        assert!(out.contains("ייעוץ"));
        assert!(!out.contains("data-edit-empty"));
    }

    #[test]
    fn editor_shows_placeholder_for_empty_values() {
        let field = Field::line(Section::Hero, Locale::En, "badge");
        let out = EditorRenderer.text(&field, " ").into_string();
        assert!(out.contains(EDIT_PLACEHOLDER));
        assert!(out.contains("data-edit-empty"));
    }

    #[test]
    fn strategy_follows_capability() {
        assert_eq!(renderer_for(Capability::Editor).capability(), Capability::Editor);
        assert_eq!(renderer_for(Capability::Viewer).capability(), Capability::Viewer);
    }
}
