/// Tailwind's default screen breakpoints (min-width, in CSS pixels).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    /// The layout switches from tab sheet to sidebar at this width.
    pub const DESKTOP: Breakpoint = Breakpoint::Xl;

    pub fn min_width_px(self) -> f64 {
        match self {
            Breakpoint::Sm => 640.0,
            Breakpoint::Md => 768.0,
            Breakpoint::Lg => 1024.0,
            Breakpoint::Xl => 1280.0,
            Breakpoint::Xxl => 1536.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// For `window.matchMedia`.
    pub fn media_query(self) -> String {
        format!("(min-width: {}px)", self.min_width_px())
    }

    pub fn matches(self, viewport_width_px: f64) -> bool {
        viewport_width_px >= self.min_width_px()
    }
}

/// A breakpoint flag as seen by a view.
///
/// Before the client reports a viewport width (server rendering) the flag is
/// `default`. A client-only watch is created with a width and never reports
/// the default.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BreakpointWatch {
    breakpoint: Breakpoint,
    default: bool,
    width_px: Option<f64>,
}

impl BreakpointWatch {
    pub fn new(breakpoint: Breakpoint, default: bool) -> Self {
        Self {
            breakpoint,
            default,
            width_px: None,
        }
    }

    pub fn client_only(breakpoint: Breakpoint, width_px: f64) -> Self {
        Self {
            breakpoint,
            default: breakpoint.matches(width_px),
            width_px: Some(width_px),
        }
    }

    /// Record a viewport width. Returns `true` when the flag flips.
    pub fn update(&mut self, width_px: f64) -> bool {
        let before = self.is_match();
        self.width_px = Some(width_px);
        before != self.is_match()
    }

    pub fn is_match(&self) -> bool {
        match self.width_px {
            Some(w) => self.breakpoint.matches(w),
            None => self.default,
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }
}
