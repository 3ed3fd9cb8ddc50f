use super::model::{ArcSpec, ChartState};
use super::VIEW_BOX_SIZE;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Renders the chart as markup for a stylesheet that defines `--big`,
/// `--small` and the `content`, `graph`, `arc` and `active` classes.
pub fn render(state: &ChartState) -> String {
    let paths: String = state.arcs().iter().map(render_path).collect();

    format!(
        r#"<main class="content"><svg xmlns="{SVG_NS}" class="graph" style="--size: {}" viewBox="0 0 {VIEW_BOX_SIZE} {VIEW_BOX_SIZE}">{paths}</svg></main>"#,
        state.zoom().size_token(),
    )
}

fn render_path(arc: &ArcSpec) -> String {
    format!(
        r#"<path data-segment="{}" class="{}" d="{}"></path>"#,
        arc.segment,
        arc.class_name(),
        arc.path(),
    )
}
