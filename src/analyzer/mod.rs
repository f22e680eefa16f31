mod classifier;

pub use classifier::RedirectClassifier;
