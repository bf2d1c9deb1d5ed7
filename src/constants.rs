pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const IMAGES_ROUTE: &str = "/images/section1";  // Where the catalog directory is mounted
pub const CATALOG_ROUTE: &str = "/api/images";      // Catalog listing endpoint

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];
pub const EXCLUDED_EXTENSIONS: [&str; 3] = ["mov", "mp4", "avi"];

pub const WORKING_SET_FLOOR: usize = 18;      // Minimum active images once steady
pub const WORKING_SET_TARGET_MIN: usize = 18; // Target size is drawn from this range at seeding
pub const WORKING_SET_TARGET_MAX: usize = 22;

pub const STAGGER_MIN: f64 = 0.05;            // Natural entry delay band (seconds)
pub const STAGGER_MAX: f64 = 0.3;
pub const BAND_PROXIMITY: f32 = 0.019;        // Bands closer than this may collide (fraction of height)
pub const CLEARANCE: f64 = 0.5;               // Gap kept between colliding windows (seconds)

pub const CAPTION_INTERVAL: f32 = 8.0;        // Split-flap caption period (seconds)
pub const NAV_SCROLL_THRESHOLD: f32 = 600.0;  // Scroll offset where the nav switches theme (pixels)
