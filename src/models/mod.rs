pub mod chat;
pub mod content;
pub mod horoscope;
pub mod kundali;
pub mod locations;
pub mod recommendation;
pub mod zodiac;

pub use chat::*;
pub use horoscope::*;
pub use kundali::*;
pub use recommendation::*;
pub use zodiac::*;
