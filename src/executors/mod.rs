pub mod univ3;
