pub mod session_test;
pub mod sql_injection_test;
pub mod xss_test;
