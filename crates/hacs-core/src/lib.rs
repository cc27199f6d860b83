pub mod approach;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod impact;
pub mod latch;
pub mod particles;
pub mod result;
pub mod scene;
pub mod state;

pub use approach::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use impact::*;
pub use latch::*;
pub use particles::*;
pub use result::*;
pub use scene::*;
pub use state::*;
