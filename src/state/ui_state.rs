#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppScreen {
    #[default]
    Home,
    Signup,
    Signin,
}

/// Whether the catalog token has been obtained for this application load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}
