mod logo;

pub use logo::LogoService;
