use crate::chart::{
    ACTIVE_STROKE_WIDTH, ARC_STROKE_WIDTH, CENTER_X, CENTER_Y, END_PADDING, RADIUS, VIEW_BOX_SIZE,
};
use crate::config::ConfigError;
use crate::geometry::{self, PathData, Point};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Complete,
    Partial,
    Incomplete,
}

impl Segment {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    #[default]
    Big,
    Small,
}

impl ZoomLevel {
    pub fn toggled(self) -> Self {
        match self {
            Self::Big => Self::Small,
            Self::Small => Self::Big,
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.into()
    }

    /// Value for the `--size` custom property, e.g. `var(--big)`.
    pub fn size_token(&self) -> String {
        format!("var(--{})", self.css_class())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    /// Clicking an arc makes it the active segment.
    #[default]
    #[strum(to_string = "segment-select", serialize = "select", serialize = "a")]
    SegmentSelect,
    /// Clicking anywhere on the chart toggles the zoom level.
    #[strum(to_string = "zoom-toggle", serialize = "zoom", serialize = "b")]
    ZoomToggle,
}

/// Share of each segment, each within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBreakdown")]
pub struct Breakdown {
    complete: f64,
    partial: f64,
    incomplete: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawBreakdown {
    complete: f64,
    partial: f64,
    incomplete: f64,
}

impl Default for RawBreakdown {
    fn default() -> Self {
        let Breakdown {
            complete,
            partial,
            incomplete,
        } = Breakdown::default();
        Self {
            complete,
            partial,
            incomplete,
        }
    }
}

impl TryFrom<RawBreakdown> for Breakdown {
    type Error = ConfigError;

    fn try_from(raw: RawBreakdown) -> Result<Self, Self::Error> {
        Self::new(raw.complete, raw.partial, raw.incomplete)
    }
}

impl Default for Breakdown {
    fn default() -> Self {
        Self {
            complete: 0.6,
            partial: 0.1,
            incomplete: 0.3,
        }
    }
}

impl Breakdown {
    pub fn new(complete: f64, partial: f64, incomplete: f64) -> Result<Self, ConfigError> {
        let breakdown = Self {
            complete,
            partial,
            incomplete,
        };

        for segment in Segment::iter() {
            let value = breakdown.get(segment);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::PercentageOutOfRange { segment, value });
            }
        }

        let total = complete + partial + incomplete;
        if total > 1.0 + f64::EPSILON {
            log::warn!("Breakdown sums to {total}, arcs will overlap");
        }

        Ok(breakdown)
    }

    pub fn get(&self, segment: Segment) -> f64 {
        match segment {
            Segment::Complete => self.complete,
            Segment::Partial => self.partial,
            Segment::Incomplete => self.incomplete,
        }
    }

    /// Angle ranges in draw order, later entries paint over earlier ones.
    /// Each arc starts where the segments before it (in complete, partial,
    /// incomplete order) end and is padded at its end.
    pub fn arc_ranges(&self) -> [(Segment, f64, f64); 3] {
        let complete = geometry::percentage_to_angle(self.complete);
        let partial = geometry::percentage_to_angle(self.partial);
        let incomplete = geometry::percentage_to_angle(self.incomplete);

        [
            (
                Segment::Incomplete,
                complete + partial,
                complete + partial + incomplete + END_PADDING,
            ),
            (
                Segment::Partial,
                complete,
                complete + partial + END_PADDING,
            ),
            (Segment::Complete, 0.0, complete + END_PADDING),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcSpec {
    pub segment: Segment,
    pub start_angle: f64,
    pub end_angle: f64,
    pub active: bool,
}

impl ArcSpec {
    pub fn path(&self) -> PathData {
        geometry::describe_arc(CENTER_X, CENTER_Y, RADIUS, self.start_angle, self.end_angle)
    }

    /// Stroke width in view-box units; the active arc is drawn wider.
    pub fn stroke_width(&self) -> f64 {
        if self.active {
            ACTIVE_STROKE_WIDTH
        } else {
            ARC_STROKE_WIDTH
        }
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        [angle, angle + 360.0]
            .iter()
            .any(|a| (self.start_angle..=self.end_angle).contains(a))
    }

    /// Space-joined class list: `arc <segment>`, plus `active` when selected.
    pub fn class_name(&self) -> String {
        let base = format!("arc {}", self.segment.name());
        class_names(&[(base.as_str(), true), ("active", self.active)])
    }
}

/// Joins the names whose condition holds with single spaces.
pub fn class_names(conditions: &[(&str, bool)]) -> String {
    conditions
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Arc(Segment),
    Background,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub should_redraw: bool,
}

impl ClickOutcome {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }
}

#[derive(Debug, Clone)]
pub struct ChartState {
    pub breakdown: Breakdown,
    pub mode: InteractionMode,
    zoom: ZoomLevel,
    active: Option<Segment>,
}

impl ChartState {
    pub fn new(breakdown: Breakdown, mode: InteractionMode, zoom: ZoomLevel) -> Self {
        Self {
            breakdown,
            mode,
            zoom,
            active: None,
        }
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn active(&self) -> Option<Segment> {
        self.active
    }

    pub fn arcs(&self) -> Vec<ArcSpec> {
        let highlight = self.mode == InteractionMode::SegmentSelect;

        self.breakdown
            .arc_ranges()
            .into_iter()
            .map(|(segment, start_angle, end_angle)| ArcSpec {
                segment,
                start_angle,
                end_angle,
                active: highlight && self.active == Some(segment),
            })
            .collect()
    }

    pub fn click(&mut self, target: ClickTarget) -> ClickOutcome {
        match (self.mode, target) {
            (InteractionMode::SegmentSelect, ClickTarget::Arc(segment)) => {
                let changed = self.active != Some(segment);
                self.active = Some(segment);
                log::debug!("Active segment: {segment}");
                ClickOutcome::new(changed)
            }
            (InteractionMode::SegmentSelect, ClickTarget::Background) => ClickOutcome::new(false),
            (InteractionMode::ZoomToggle, _) => {
                self.zoom = self.zoom.toggled();
                log::debug!("Zoom: {}", self.zoom);
                ClickOutcome::new(true)
            }
        }
    }

    /// Swaps in a new configuration. Selection is dropped when the mode changes.
    pub fn reconfigure(&mut self, breakdown: Breakdown, mode: InteractionMode) {
        if self.mode != mode {
            self.active = None;
        }
        self.breakdown = breakdown;
        self.mode = mode;
    }

    /// Finds the topmost arc under `point` (view-box coordinates).
    pub fn hit_test(&self, point: Point) -> ClickTarget {
        let center = Point::new(CENTER_X, CENTER_Y);
        let off_ring = (point.distance(center) - RADIUS).abs();
        let angle = geometry::clockwise_angle(center, point);

        self.arcs()
            .iter()
            .rev()
            .find(|arc| off_ring <= arc.stroke_width() / 2.0 && arc.contains_angle(angle))
            .map_or(ClickTarget::Background, |arc| ClickTarget::Arc(arc.segment))
    }
}

/// Uniform view-box fit, centered in a `width` x `height` surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Viewport {
    pub fn fit(width: f64, height: f64) -> Self {
        let scale = (width.min(height) / VIEW_BOX_SIZE).max(f64::MIN_POSITIVE);
        let offset = Point::new(
            (width - VIEW_BOX_SIZE * scale) / 2.0,
            (height - VIEW_BOX_SIZE * scale) / 2.0,
        );
        Self { scale, offset }
    }

    pub fn to_view_box(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset.x) / self.scale,
            (point.y - self.offset.y) / self.scale,
        )
    }
}
