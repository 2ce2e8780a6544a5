//! Pengyou HTTP client module
//!
//! This module contains the OpenApiClient, the Pengyou facade and their
//! builders.

mod form;
mod logging;

mod openapi_client;
pub use openapi_client::{OpenApiClient, OpenApiClientBuilder};

mod pengyou;
pub use pengyou::Pengyou;

mod builder;
pub use builder::PengyouBuilder;
