//! Headline fit routine.
//!
//! Shrinks a heading's font size in fixed steps until its box fits inside the
//! space its container leaves below the fixed header, never going below a
//! floor derived from the original size.
//!
//! Layout measurement is abstracted behind [`HeadlineLayout`]; the browser
//! implementation reads bounding boxes, tests use a simulated layout.

/// Tunables for the fit routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Font-size decrement per iteration, in px.
    pub step: f64,
    /// Absolute minimum font size, in px.
    pub min_font: f64,
    /// Minimum font size as a fraction of the original size.
    pub floor_ratio: f64,
    /// Vertical padding kept free below the header, in px.
    pub padding: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            step: 2.0,
            min_font: 28.0,
            floor_ratio: 0.45,
            padding: 12.0,
        }
    }
}

impl FitConfig {
    /// Smallest size the heading may shrink to, given its original size.
    #[must_use]
    pub fn floor_for(&self, original: f64) -> f64 {
        self.min_font.max((original * self.floor_ratio).floor())
    }
}

/// One layout snapshot, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub container_top: f64,
    pub container_height: f64,
    /// Zero when there is no header element.
    pub header_height: f64,
    pub heading_top: f64,
    pub heading_height: f64,
}

impl Measurement {
    /// Vertical space available to the heading.
    #[must_use]
    pub fn available(&self, padding: f64) -> f64 {
        self.container_height - self.header_height - padding
    }

    /// Whether the heading's box lies within the available space, measured
    /// from the container's top edge.
    #[must_use]
    pub fn fits(&self, padding: f64) -> bool {
        let top = self.heading_top - self.container_top;
        let bottom = top + self.heading_height;
        top >= 0.0 && bottom <= self.available(padding)
    }
}

/// Access to the heading's font size and current layout.
pub trait HeadlineLayout {
    /// Current computed font size, in px.
    fn font_size(&self) -> f64;
    /// Apply an inline font-size override, in px.
    fn set_font_size(&mut self, px: f64);
    /// Measure the current layout.
    fn measure(&self) -> Measurement;
}

/// Outcome of a fit pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// The heading fit without changes.
    AlreadyFits,
    /// The heading fits at this size.
    Fitted { font_size: f64 },
    /// The floor was reached and the heading still overflows.
    Floored { font_size: f64 },
}

/// Successive sizes tried when shrinking from `start` toward `floor`.
///
/// Strictly decreasing, clamped at `floor`, and empty when `start` is
/// already at or below the floor.
pub fn shrink_steps(start: f64, floor: f64, step: f64) -> impl Iterator<Item = f64> {
    let step = if step > 0.0 { step } else { 1.0 };
    std::iter::successors(Some(start), move |&current| {
        (current > floor).then(|| floor.max(current - step))
    })
    .skip(1)
}

/// Shrink the heading until it fits or the floor is reached.
pub fn shrink_to_fit<L: HeadlineLayout>(layout: &mut L, config: &FitConfig, floor: f64) -> FitOutcome {
    if layout.measure().fits(config.padding) {
        return FitOutcome::AlreadyFits;
    }

    let mut size = layout.font_size();
    for next in shrink_steps(size, floor, config.step) {
        size = next;
        layout.set_font_size(size);
        if layout.measure().fits(config.padding) {
            return FitOutcome::Fitted { font_size: size };
        }
    }
    FitOutcome::Floored { font_size: size }
}

/// Fit routine bound to one heading, remembering its original size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineFitter {
    config: FitConfig,
    floor: f64,
}

impl HeadlineFitter {
    /// Capture the floor from the stylesheet-defined size at setup.
    #[must_use]
    pub fn new(config: FitConfig, original_font_size: f64) -> Self {
        Self {
            floor: config.floor_for(original_font_size),
            config,
        }
    }

    #[must_use]
    pub const fn floor(&self) -> f64 {
        self.floor
    }

    #[must_use]
    pub const fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Run one fit pass.
    pub fn fit<L: HeadlineLayout>(&self, layout: &mut L) -> FitOutcome {
        shrink_to_fit(layout, &self.config, self.floor)
    }
}

/// Events that re-run the fit after clearing any inline override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTrigger {
    Resize,
    OrientationChange,
    /// Window `load`.
    PageLoad,
    /// Web fonts finished loading.
    FontsReady,
}

impl FitTrigger {
    /// Delay before clearing the override and scheduling the fit, in ms.
    #[must_use]
    pub const fn delay_ms(self) -> u32 {
        match self {
            Self::Resize => 0,
            Self::OrientationChange => 160,
            Self::PageLoad => 50,
            Self::FontsReady => 30,
        }
    }
}
