#[cfg(test)]
mod redis_client_tests;
