mod engine;
mod overrides;
