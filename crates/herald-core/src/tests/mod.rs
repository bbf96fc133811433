// Cross-module test scenarios
#[cfg(test)]
mod integration;
