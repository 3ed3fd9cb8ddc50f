use crate::chart::Segment;
use crate::config::SizeConfig;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub complete: Srgba<f64>,
    pub partial: Srgba<f64>,
    pub incomplete: Srgba<f64>,
    pub active: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            complete: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.2, 0.7, 0.35, 1.0),
                None,
            ),
            partial: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.9, 0.65, 0.1, 1.0),
                None,
            ),
            incomplete: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.5),
                Some(0.5),
            ),
            active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 1.0),
                Some(1.0),
            ),
        }
    }

    pub fn segment(&self, segment: Segment) -> Srgba<f64> {
        match segment {
            Segment::Complete => self.complete,
            Segment::Partial => self.partial,
            Segment::Incomplete => self.incomplete,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Stylesheet for the `content` and `graph` classes plus one rule per zoom
/// token.
pub fn stylesheet(sizes: &SizeConfig) -> String {
    format!(
        "
.content {{
    padding: 12px;
}}
.graph.big {{
    min-width: {big}px;
    min-height: {big}px;
}}
.graph.small {{
    min-width: {small}px;
    min-height: {small}px;
}}
",
        big = sizes.big,
        small = sizes.small,
    )
}

pub fn load_css(sizes: &SizeConfig) -> gtk::CssProvider {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&stylesheet(sizes));

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
    provider
}
