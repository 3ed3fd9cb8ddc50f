use super::model::{ArcSpec, ChartState, Viewport};
use super::{CENTER_X, CENTER_Y, RADIUS};
use crate::gui::theme::ThemeColors;
use cairo::{Context, LineCap};
use palette::Srgba;

struct ArcRenderer<'a> {
    arc: &'a ArcSpec,
}

impl<'a> ArcRenderer<'a> {
    fn new(arc: &'a ArcSpec) -> Self {
        Self { arc }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = self.color(colors).into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(self.arc.stroke_width());
        cr.set_line_cap(LineCap::Butt);

        // same direction as the path data: from the end angle back to the start
        cr.new_sub_path();
        cr.arc_negative(
            CENTER_X,
            CENTER_Y,
            RADIUS,
            to_cairo_radians(self.arc.end_angle),
            to_cairo_radians(self.arc.start_angle),
        );
        cr.stroke()
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        if self.arc.active {
            colors.active
        } else {
            colors.segment(self.arc.segment)
        }
    }
}

/// Cairo measures angles from the positive x axis; ours start at 12 o'clock.
fn to_cairo_radians(angle_degrees: f64) -> f64 {
    (angle_degrees - 90.0).to_radians()
}

pub fn draw(
    cr: &Context,
    state: &ChartState,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let viewport = Viewport::fit(width, height);

    cr.save()?;
    cr.translate(viewport.offset.x, viewport.offset.y);
    cr.scale(viewport.scale, viewport.scale);

    for arc in state.arcs() {
        ArcRenderer::new(&arc).draw(cr, colors)?;
    }

    cr.restore()
}
