pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod ignored;
pub mod output;
pub mod report;
pub mod rot;
pub mod run;
pub mod slack;
pub mod storage;
pub mod trace;

#[cfg(test)]
mod test_server;
