pub mod media;
pub mod record;
pub mod session;
pub mod view;

pub use media::*;
pub use record::*;
pub use session::*;
pub use view::*;
