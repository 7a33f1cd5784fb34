mod cli;
mod storage;
