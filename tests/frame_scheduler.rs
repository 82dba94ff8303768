mod tests {
    use embassy_time::{Duration, Instant};
    use lighthaus_composer::color::{Gradient, Rgb};
    use lighthaus_composer::frame_scheduler::{RENDER_FAILURE_LOG_INTERVAL, is_reported_failure};
    use lighthaus_composer::{
        ControlChannel, ControlMessage, Controller, ControllerConfig, FrameScheduler,
        OutputDriver, RenderError,
    };

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) -> Result<(), RenderError> {
            self.frames.push(colors.to_vec());
            Ok(())
        }
    }

    struct BrokenDriver;

    impl OutputDriver for BrokenDriver {
        fn write(&mut self, _colors: &[Rgb]) -> Result<(), RenderError> {
            Err(RenderError::Disconnected)
        }
    }

    fn initial() -> Gradient {
        Gradient::solid(
            Instant::from_secs(0),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 0, 255),
        )
    }

    #[test]
    fn test_tick_writes_frame_and_paces() {
        let channel: ControlChannel<Gradient, 4> = ControlChannel::new();
        let config = ControllerConfig::new(initial(), 6);
        let controller = Controller::<Gradient, 8, 4>::new(channel.receiver(), &config);
        let mut scheduler = FrameScheduler::new(controller, RecordingDriver::default());

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(10));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
        assert!(result.render_error.is_none());
        assert!(result.inbox.is_empty());

        let result = scheduler.tick(Instant::from_millis(12));
        assert_eq!(result.next_deadline, Instant::from_millis(20));
        assert_eq!(result.sleep_duration, Duration::from_millis(8));

        assert_eq!(scheduler.output().frames.len(), 2);
        assert_eq!(scheduler.output().frames[0].len(), 6);
    }

    #[test]
    fn test_drift_resets_pacing() {
        let channel: ControlChannel<Gradient, 4> = ControlChannel::new();
        let config = ControllerConfig::new(initial(), 6);
        let controller = Controller::<Gradient, 8, 4>::new(channel.receiver(), &config);
        let mut scheduler = FrameScheduler::with_frame_duration(
            controller,
            RecordingDriver::default(),
            Duration::from_millis(20),
        );

        scheduler.tick(Instant::from_millis(0));
        let result = scheduler.tick(Instant::from_millis(500));
        assert_eq!(result.next_deadline, Instant::from_millis(520));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));
    }

    #[test]
    fn test_render_error_is_not_fatal() {
        let channel: ControlChannel<Gradient, 4> = ControlChannel::new();
        let config = ControllerConfig::new(initial(), 6);
        let controller = Controller::<Gradient, 8, 4>::new(channel.receiver(), &config);
        let mut scheduler = FrameScheduler::new(controller, BrokenDriver);

        channel
            .sender()
            .try_send(ControlMessage::FastModeToggled(true))
            .unwrap();
        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.render_error, Some(RenderError::Disconnected));
        assert_eq!(result.inbox.fast_mode, Some(true));

        let result = scheduler.tick(Instant::from_millis(10));
        assert_eq!(result.render_error, Some(RenderError::Disconnected));
        assert_eq!(scheduler.render_failures(), 2);
        assert_eq!(
            scheduler.controller().state().fast_mode_reference(),
            Some(Instant::from_millis(0))
        );
    }

    #[test]
    fn test_failure_warnings_are_throttled() {
        assert!(is_reported_failure(1));
        assert!(!is_reported_failure(2));
        assert!(!is_reported_failure(RENDER_FAILURE_LOG_INTERVAL - 1));
        assert!(is_reported_failure(RENDER_FAILURE_LOG_INTERVAL));
        assert!(!is_reported_failure(RENDER_FAILURE_LOG_INTERVAL + 1));
        assert!(is_reported_failure(RENDER_FAILURE_LOG_INTERVAL * 3));

        // one second of an unplugged strip at 10 ms per tick
        let reported = (1..=100).filter(|failures| is_reported_failure(*failures)).count();
        assert_eq!(reported, 1);
    }

    struct FlakyDriver {
        fail: bool,
    }

    impl OutputDriver for FlakyDriver {
        fn write(&mut self, _colors: &[Rgb]) -> Result<(), RenderError> {
            if self.fail { Err(RenderError::Io) } else { Ok(()) }
        }
    }

    #[test]
    fn test_successful_frame_resets_failure_count() {
        let channel: ControlChannel<Gradient, 4> = ControlChannel::new();
        let config = ControllerConfig::new(initial(), 6);
        let controller = Controller::<Gradient, 8, 4>::new(channel.receiver(), &config);
        let mut scheduler = FrameScheduler::new(controller, FlakyDriver { fail: true });

        scheduler.tick(Instant::from_millis(0));
        scheduler.tick(Instant::from_millis(10));
        assert_eq!(scheduler.render_failures(), 2);

        scheduler.output_mut().fail = false;
        scheduler.tick(Instant::from_millis(20));
        assert_eq!(scheduler.render_failures(), 0);
    }

    #[test]
    fn test_messages_apply_after_the_frame() {
        let channel: ControlChannel<Gradient, 4> = ControlChannel::new();
        let config = ControllerConfig::new(initial(), 6);
        let controller = Controller::<Gradient, 8, 4>::new(channel.receiver(), &config);
        let mut scheduler = FrameScheduler::new(controller, RecordingDriver::default());

        let green = Gradient::solid(
            Instant::from_secs(0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 255, 0),
        );
        channel
            .sender()
            .try_send(ControlMessage::UserGradientOverride(green))
            .unwrap();

        let result = scheduler.tick(Instant::from_secs(1));
        assert_eq!(result.inbox.overrides, 1);
        assert_eq!(scheduler.output().frames[0][0], Rgb::new(255, 0, 0));

        scheduler.tick(Instant::from_secs(6));
        assert_eq!(scheduler.output().frames[1][0], Rgb::new(0, 255, 0));
    }
}
