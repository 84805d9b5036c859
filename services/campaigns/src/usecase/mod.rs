pub mod campaign;
pub mod credential;
pub mod dispatch;
pub mod oauth;
pub mod post;
pub mod proposal;
pub mod reconcile;
