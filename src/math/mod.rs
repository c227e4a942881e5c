mod range;

pub use range::{known_range, normalize_into, plain_range, HeightRange};
