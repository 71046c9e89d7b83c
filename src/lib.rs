//! postwave
//!
//! Animated dual-series activity charts: two toggleable series on a shared
//! scale, scrolling continuously, with optional smoothing, sparkle markers,
//! date ticks and a hover tooltip. Pairs with the `postwave` CLI and the
//! `postwave-gui` desktop viewer.
//!
//! ### Layers
//! - `preprocess`: smoothing and the shared vertical scale
//! - `resample`: pixel and cursor positions to interpolated values
//! - `scene`: one frame as a list of draw commands
//! - `interaction` and `chart`: hover, clicks, toggles and the frame lifecycle
//! - `viz`: SVG/PNG snapshots and egui painting
//!
//! ### Example
//! ```no_run
//! use postwave::{ChartData, ChartOptions, LiveChart, ManualHost};
//!
//! let data = ChartData::dual(
//!     vec![3.0, 5.0, 2.0, 8.0],
//!     vec![1.0, 4.0, 6.0, 2.0],
//!     vec!["2024-05-01".into(), "2024-05-02".into(), "2024-05-03".into(), "2024-05-04".into()],
//! );
//! let mut host = ManualHost::new();
//! let options = ChartOptions::default();
//! let mut chart = LiveChart::new(&mut host, postwave::NoopListener, data, &options);
//! chart.mount(320.0, 2.0);
//! let frame = chart.host_mut().take_frame().expect("first frame");
//! let commands = chart.on_frame(frame).unwrap_or_default();
//! println!("{} draw commands", commands.len());
//! chart.dispose();
//! ```

pub mod api;
pub mod chart;
pub mod clock;
pub mod config;
pub mod error;
pub mod interaction;
pub mod models;
pub mod preprocess;
pub mod resample;
pub mod scene;
pub mod stats;
pub mod storage;
pub mod text;
pub mod viz;
pub mod wave;

pub use chart::{Lifecycle, LiveChart};
pub use clock::{
    AnimationClock, FrameScheduler, FrameToken, Host, ManualHost, ResizeNotifier, Subscription,
};
pub use config::{ChartOptions, Settings};
pub use error::{Error, Result};
pub use interaction::{ChartEvent, ChartListener, EventQueue, NoopListener, Toggle, ToggleMode};
pub use models::{ChartData, ChartMode, DisplayState, SeriesId};
pub use scene::{CanvasSize, DrawCommand, render_frame};
