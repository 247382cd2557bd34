mod cli;
mod config;
mod display;
mod layout;
mod metadata;
mod mpris;
mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
