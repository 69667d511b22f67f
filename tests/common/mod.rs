pub mod stub_goose;
