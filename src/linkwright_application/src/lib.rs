pub mod use_cases;

pub use use_cases::{
    redeem_link::RedeemLinkUseCase,
    request_email_change_links::RequestEmailChangeLinksUseCase,
    request_signup_link::RequestSignupLinkUseCase, sign_in::SignInUseCase,
};
