use crate::images::ImagePayload;

/// One element of a multimodal analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPart<'a> {
    Instruction(&'a str),
    Image(&'a ImagePayload),
}

/// The instruction template followed by the chart images, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub instruction: String,
    pub images: Vec<ImagePayload>,
}

impl AnalysisRequest {
    pub fn parts(&self) -> impl Iterator<Item = RequestPart<'_>> {
        std::iter::once(RequestPart::Instruction(self.instruction.as_str()))
            .chain(self.images.iter().map(RequestPart::Image))
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

pub fn compose(instruction: &str, images: Vec<ImagePayload>) -> AnalysisRequest {
    AnalysisRequest {
        instruction: instruction.to_string(),
        images,
    }
}
