mod aes;
mod cmac;
