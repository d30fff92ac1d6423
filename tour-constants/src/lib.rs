pub mod camera;
pub mod panorama;
pub mod paths;
pub mod tour_defaults;
