//! Audio output session: one mono cpal stream rendering the tone generator.

use std::sync::Arc;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, Stream};
use log::{debug, info};

use crate::core::{Frequency, ToneGenerator};
use crate::error::PlayError;
use crate::messaging::{fault_channel, FaultSender, Faults};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
const CHANNELS: u16 = 1;

/// An open, playing output stream. Closing it, explicitly or by drop,
/// releases the device; a session cannot be restarted.
pub struct AudioSession {
    stream: Option<Stream>,
    faults: Faults,
    sample_rate: u32,
}

impl AudioSession {
    /// Open the default output device and start rendering `frequency`.
    pub fn start(frequency: Arc<Frequency>, sample_rate: u32) -> Result<Self> {
        let host = cpal::default_host();
        debug!("using audio host: {}", host.id().name());

        let device = host
            .default_output_device()
            .ok_or(PlayError::NoOutputDevice)?;
        info!(
            "using output device: {}",
            device.name().unwrap_or_else(|_| "<unnamed>".into())
        );

        let sample_format = device
            .default_output_config()
            .context("Failed to get default output config")?
            .sample_format();
        let config = cpal::StreamConfig {
            channels: CHANNELS,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        debug!("stream config: {:?} as {:?}", config, sample_format);

        let (fault_sender, faults) = fault_channel();
        let tone = ToneGenerator::new(frequency, sample_rate);
        let stream = match sample_format {
            SampleFormat::F32 => create_stream::<f32>(&device, &config, tone, fault_sender),
            SampleFormat::F64 => create_stream::<f64>(&device, &config, tone, fault_sender),
            SampleFormat::I16 => create_stream::<i16>(&device, &config, tone, fault_sender),
            SampleFormat::I32 => create_stream::<i32>(&device, &config, tone, fault_sender),
            SampleFormat::U16 => create_stream::<u16>(&device, &config, tone, fault_sender),
            format => return Err(PlayError::UnsupportedSampleFormat(format).into()),
        }?;

        stream.play().context("Failed to start audio stream")?;
        info!("audio stream started at {} Hz", sample_rate);

        Ok(Self {
            stream: Some(stream),
            faults,
            sample_rate,
        })
    }

    pub fn faults(&self) -> &Faults {
        &self.faults
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stop the stream and release the device.
    pub fn close(mut self) -> Result<()> {
        match self.stream.take() {
            Some(stream) => {
                let paused = stream.pause().context("Failed to stop audio stream");
                drop(stream);
                info!("audio stream closed");
                paused
            }
            None => Ok(()),
        }
    }
}

impl Drop for AudioSession {
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            debug!("audio stream released on drop");
        }
    }
}

fn create_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut tone: ToneGenerator,
    faults: FaultSender,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32> + Send + 'static,
{
    let channels = config.channels as usize;
    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| tone.fill(data, channels),
            move |err| faults.report(err),
            None,
        )
        .context("Failed to open audio stream")?;
    Ok(stream)
}
