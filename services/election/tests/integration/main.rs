
mod admin_test;
mod approval_test;
mod login_test;
mod otp_test;
mod reset_test;
mod vote_test;
