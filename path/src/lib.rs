//! `Subpath`, `LineStyles` and `Shape`: the fluent path builder on top of
//! [`pathkit_geom`]'s segment primitives, plus the JSON serialization
//! contract.

pub mod line_styles;
pub mod serialization;
pub mod shape;
pub mod subpath;

#[doc(inline)]
pub use line_styles::{LineCap, LineJoin, LineStyles};
#[doc(inline)]
pub use shape::Shape;
#[doc(inline)]
pub use subpath::Subpath;

pub use pathkit_geom as geom;
