//! Device classification from user-agent strings

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [Self::Desktop, Self::Mobile, Self::Tablet];

    /// Classify a user agent; anything unrecognized counts as desktop
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();

        // Android tablets omit the "mobile" token.
        if ua.contains("ipad")
            || ua.contains("tablet")
            || (ua.contains("android") && !ua.contains("mobile"))
        {
            Self::Tablet
        } else if ua.contains("mobi") || ua.contains("iphone") || ua.contains("ipod") {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown device type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_agents() {
        let chrome = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";
        assert_eq!(DeviceType::from_user_agent(chrome), DeviceType::Desktop);
        assert_eq!(DeviceType::from_user_agent(""), DeviceType::Desktop);
    }

    #[test]
    fn test_mobile_agents() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
        assert_eq!(DeviceType::from_user_agent(iphone), DeviceType::Mobile);
        assert_eq!(DeviceType::from_user_agent(android), DeviceType::Mobile);
    }

    #[test]
    fn test_tablet_agents() {
        let ipad = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) Mobile/15E148";
        let android_tab = "Mozilla/5.0 (Linux; Android 13; SM-X700) Safari/537.36";
        assert_eq!(DeviceType::from_user_agent(ipad), DeviceType::Tablet);
        assert_eq!(DeviceType::from_user_agent(android_tab), DeviceType::Tablet);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("mobile".parse::<DeviceType>().unwrap(), DeviceType::Mobile);
        assert!("watch".parse::<DeviceType>().is_err());
    }
}
