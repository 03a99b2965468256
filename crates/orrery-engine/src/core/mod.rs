pub mod boundary;
pub mod clock;
pub mod composer;
pub mod scene;
