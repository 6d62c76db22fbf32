//! Static lookup data: sound names, colors, command wire codes.
//!
//! Pure reads consulted by callers before issuing commands. The byte values
//! mirror the robot's command set; nothing here carries state.

use super::driver::Rgb;

/// Built-in sound effects, name and a short description.
pub const SOUNDS: &[(&str, &str)] = &[
    ("hi", "Cheerful greeting chirp"),
    ("bye", "Descending goodbye tone"),
    ("laugh", "Robot giggle"),
    ("gobble", "Turkey gobble"),
    ("growl", "Low growl"),
    ("croak", "Frog croak"),
    ("horse", "Horse whinny"),
    ("cat", "Cat meow"),
    ("dog", "Dog bark"),
    ("elephant", "Elephant trumpet"),
    ("siren", "Emergency siren"),
    ("tire_squeal", "Screeching tires"),
    ("charge", "Bugle charge call"),
    ("ohnoes", "Worried oh-no"),
];

pub fn sound_exists(name: &str) -> bool {
    SOUNDS.iter().any(|(n, _)| *n == name)
}

/// Named colors accepted by the neck and ear lights.
pub const COLORS: &[(&str, Rgb)] = &[
    ("off", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("blue", Rgb::new(0, 0, 255)),
    ("purple", Rgb::new(128, 0, 128)),
    ("pink", Rgb::new(255, 105, 180)),
];

pub fn resolve_color(name: &str) -> Option<Rgb> {
    COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| *rgb)
}

/// Command name to wire code, for callers that inspect traffic.
pub const COMMAND_CODES: &[(&str, u8)] = &[
    ("drive", 0x02),
    ("spin", 0x03),
    ("stop", 0x04),
    ("head_yaw", 0x06),
    ("head_pitch", 0x07),
    ("eye_brightness", 0x08),
    ("neck_color", 0x0b),
    ("left_ear_color", 0x0c),
    ("right_ear_color", 0x0d),
    ("play_sound", 0x18),
    ("reset", 0xc8),
];

pub fn command_code(name: &str) -> Option<u8> {
    COMMAND_CODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}
