//! Service implementations.

mod account_service_impl;
mod snippet_service_impl;

pub use account_service_impl::AccountServiceImpl;
pub use snippet_service_impl::SnippetServiceImpl;
