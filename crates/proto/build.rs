// Build script generating the PredictionService client and server stubs.
//
// The message types live in src/lib.rs as hand-written prost messages, so the
// service is described with tonic-build's manual builder and no protoc is needed.

fn main() {
    let predict = tonic_build::manual::Method::builder()
        .name("predict")
        .route_name("Predict")
        .input_type("crate::PredictRequest")
        .output_type("crate::PredictResponse")
        .codec_path("tonic::codec::ProstCodec")
        .build();

    let service = tonic_build::manual::Service::builder()
        .name("PredictionService")
        .package("tensorflow.serving")
        .method(predict)
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);

    println!("cargo:rerun-if-changed=build.rs");
}
