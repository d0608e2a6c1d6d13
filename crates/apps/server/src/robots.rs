#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RobotsPolicy {
    AllowAll,
    DisallowAll,
}

impl RobotsPolicy {
    pub fn from_restrictive(restrictive: bool) -> Self {
        if restrictive {
            RobotsPolicy::DisallowAll
        } else {
            RobotsPolicy::AllowAll
        }
    }

    pub fn render(self) -> String {
        let rule = match self {
            RobotsPolicy::AllowAll => "Allow",
            RobotsPolicy::DisallowAll => "Disallow",
        };
        format!("User-Agent: *\n{rule}: /\n")
    }
}
