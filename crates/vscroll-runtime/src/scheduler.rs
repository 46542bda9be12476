#![forbid(unsafe_code)]

//! Animation-frame scheduling.

/// Host frame clock.
///
/// `request_frame` asks for one future frame; when it arrives the host calls
/// [`Updater::on_frame`](crate::Updater::on_frame). The engine never requests
/// a second frame while one is outstanding.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for &mut F {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for Box<F> {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}
