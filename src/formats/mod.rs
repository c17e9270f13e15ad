pub mod ncsbe;
