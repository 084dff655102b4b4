mod review_session_tests;
mod run_app_tests;
