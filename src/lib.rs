//! Issue activity report: find issues that moved through in-progress work
//! during a date window, replay their assignee history, and report who held
//! each issue while the window was open.

pub mod cli;
pub mod error;
pub mod ext;
pub mod history;
pub mod intersect;
pub mod jql;
pub mod matcher;
pub mod model;
pub mod params;
pub mod render;
pub mod report;
pub mod timeline;
pub mod tracker;
pub mod util;
pub mod window;

pub use error::{ReportError, Result};
