mod blocks_tests;
mod filters_tests;
mod macros_tests;
mod statements_tests;
mod trivia_tests;
