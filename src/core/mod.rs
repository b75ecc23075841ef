pub mod engine;
pub mod pipeline;
pub mod verify;

pub use crate::domain::model::{
    ActionKind, ApplyReport, PathKind, RenderResult, RenderedFile, ScaffoldAction,
};
pub use crate::domain::ports::{ConfigProvider, Provision, Storage};
pub use crate::utils::error::Result;
