mod helpers;

mod dispatch_test;
mod oauth_test;
mod post_test;
mod proposal_test;
