#[cfg(test)]
mod provider_tests;
