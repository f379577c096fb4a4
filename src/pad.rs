/// Most digits the pad accepts for one answer
pub const MAX_DIGITS: usize = 3;

/// Keys of the on-screen pad, row by row
pub const PAD_KEYS: [[char; 3]; 4] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['C', '0', '✓'],
];

/// Digits keyed in for the live question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPad {
    digits: String,
}

impl AnswerPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the key was ignored
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Hand the entry over for submission and reset the pad
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_three_digits() {
        let mut pad = AnswerPad::new();
        for c in "1234".chars() {
            pad.push_digit(c);
        }
        assert_eq!(pad.as_str(), "123");
        assert!(!pad.push_digit('9'));
    }

    #[test]
    fn test_ignores_non_digits() {
        let mut pad = AnswerPad::new();
        assert!(!pad.push_digit('x'));
        assert!(!pad.push_digit('-'));
        assert!(pad.is_empty());
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut pad = AnswerPad::new();
        pad.push_digit('4');
        pad.push_digit('2');
        pad.backspace();
        assert_eq!(pad.as_str(), "4");
        pad.clear();
        assert!(pad.is_empty());
        pad.backspace();
        assert!(pad.is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut pad = AnswerPad::new();
        pad.push_digit('5');
        pad.push_digit('6');
        assert_eq!(pad.take(), "56");
        assert!(pad.is_empty());
    }

    #[test]
    fn test_pad_layout() {
        let flat: String = PAD_KEYS.iter().flatten().collect();
        assert_eq!(flat, "123456789C0✓");
    }
}
