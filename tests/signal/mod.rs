mod identity;
mod dispositions;
