pub mod ocean {
    #[allow(clippy::all, clippy::pedantic)]
    pub mod v1 {
        tonic::include_proto!("ocean.v1");
    }

    #[allow(clippy::all, clippy::pedantic)]
    pub mod v1alpha {
        tonic::include_proto!("ocean.v1alpha");
    }
}

pub use ocean::{v1, v1alpha};
