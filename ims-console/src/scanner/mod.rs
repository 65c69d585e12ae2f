//! Barcode scanner
//!
//! Camera selection -> periodic decode -> resource lookup -> result view.

pub mod camera;
pub mod decoder;
pub mod devices;
pub mod page;
pub mod presenter;
pub mod resolver;
pub mod scan_loop;

pub use camera::{CameraBackend, CameraError, Frame, StreamHandle, VideoDevice, VideoStream};
pub use decoder::{BarcodeDecoder, DecodeError};
pub use devices::DeviceSelector;
pub use page::ScannerPage;
pub use presenter::ScanResultView;
pub use resolver::{RESOLVE_ERROR, ResolverState, ResourceResolver};
pub use scan_loop::{DEFAULT_SCAN_INTERVAL, ScanEvent, ScanLoop, ScanOutput};
