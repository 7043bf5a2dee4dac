//! Inputs fed into one control-loop tick.

/// Debounced button event.
///
/// Debouncing and press classification happen outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Nothing happened.
    #[default]
    None,
    /// Released before the long-press time.
    ShortPress,
    /// Held past the long-press time.
    LongPress,
}

/// Command received from the network side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Extend fully.
    Open,
    /// Retract fully.
    Close,
    /// Stop where it is.
    Stop,
    /// Move to a position in percent.
    SetPosition(f32),
    /// Set the full-travel time in milliseconds.
    Calibrate(u32),
    /// Set the wind threshold in pulses per minute.
    SetWindThreshold(u32),
}

impl Command {
    /// Parse a bare `OPEN`, `CLOSE` or `STOP` keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.eq_ignore_ascii_case("open") {
            Some(Command::Open)
        } else if keyword.eq_ignore_ascii_case("close") {
            Some(Command::Close)
        } else if keyword.eq_ignore_ascii_case("stop") {
            Some(Command::Stop)
        } else {
            None
        }
    }
}

/// Everything sampled during one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceInputs {
    /// Extend button event.
    pub extend_button: ButtonAction,
    /// Retract button event.
    pub retract_button: ButtonAction,
    /// Pending network command.
    pub command: Option<Command>,
    /// Running anemometer pulse total.
    pub wind_pulses: Option<u32>,
}

impl DeviceInputs {
    /// Inputs carrying only a network command.
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    /// Inputs carrying only the anemometer total.
    pub fn wind(total_pulses: u32) -> Self {
        Self {
            wind_pulses: Some(total_pulses),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(Command::from_keyword("OPEN"), Some(Command::Open));
        assert_eq!(Command::from_keyword("close"), Some(Command::Close));
        assert_eq!(Command::from_keyword(" Stop\n"), Some(Command::Stop));
        assert_eq!(Command::from_keyword("halt"), None);
    }
}
