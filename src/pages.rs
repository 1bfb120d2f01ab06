//! Static page generation.

pub mod detail;
pub mod index;
pub mod tag;

pub use detail::generate_detail;
pub use index::generate_index;
pub use tag::generate_tag;
