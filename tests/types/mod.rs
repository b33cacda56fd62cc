mod chain;
mod fill;
mod printer;
