//! Character to flap position mapping

/// Characters printed on the flaps, indexed by flap position
///
/// Position 0 is the blank flap that sits right after the home reference.
pub struct CharacterMap;

const CHARS: [char; CharacterMap::LEN] = [' ', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

impl CharacterMap {
    /// Number of printed flaps
    pub const LEN: usize = 11;

    /// Flap position showing `c`, if any flap does
    pub fn index_of(c: char) -> Option<u8> {
        CHARS.iter().position(|&x| x == c).map(|i| i as u8)
    }

    /// Character shown at flap `index`
    pub fn char_at(index: u8) -> Option<char> {
        CHARS.get(index as usize).copied()
    }

    /// All characters in flap order
    pub fn chars() -> &'static [char] {
        &CHARS
    }
}
