mod one_hot;
mod preprocessor;
mod scaler;

pub use one_hot::OneHotEncoder;
pub use preprocessor::Preprocessor;
pub use scaler::StandardScaler;
