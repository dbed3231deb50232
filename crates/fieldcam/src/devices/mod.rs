//! Desktop stand-ins for the camera, encoder and media gallery.

mod file_capture;
mod folder_gallery;
mod passthrough_compressor;

pub(crate) use {
    file_capture::FileCaptureDevice, folder_gallery::FolderGallery,
    passthrough_compressor::PassthroughCompressor,
};
