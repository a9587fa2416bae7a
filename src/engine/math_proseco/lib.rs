mod angle;
pub use angle::*;

mod pose;
pub use pose::*;

mod circle;
pub use circle::*;

mod oriented_rect;
pub use oriented_rect::*;

pub use geometry_tests::*;
