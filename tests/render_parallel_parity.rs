mod render_parallel_parity {
    use gradient_synth::{
        GradientSpec, GradientSynthesizer, ImageFormat, NoiseRange, NoiseSpec, Pattern,
        RasterOpts, RasterTarget, Rgb8,
    };

    fn spec(pattern: Pattern) -> GradientSpec {
        GradientSpec::new(
            vec![
                Rgb8::from_u24(0x0EA5E9),
                Rgb8::from_u24(0xF59E0B),
                Rgb8::from_u24(0x2563EB),
            ],
            37.5,
            pattern,
        )
    }

    fn noise() -> NoiseSpec {
        NoiseSpec {
            seed: 0xDEAD_BEEF,
            range: NoiseRange::Strong,
            ..NoiseSpec::enabled(0.7)
        }
    }

    #[test]
    fn parallel_output_matches_serial() {
        let target = RasterTarget::new(203, 151, ImageFormat::Png);
        let serial = GradientSynthesizer::with_opts(RasterOpts::serial());
        let variants = [
            RasterOpts::default(),
            RasterOpts {
                rows_per_chunk: 1,
                ..RasterOpts::default()
            },
            RasterOpts {
                rows_per_chunk: 7,
                threads: Some(3),
                ..RasterOpts::default()
            },
            RasterOpts {
                rows_per_chunk: 1000,
                threads: Some(1),
                ..RasterOpts::default()
            },
        ];

        for pattern in Pattern::ALL {
            let expected = serial
                .render_raster(&spec(pattern), &noise(), &target)
                .unwrap();
            for opts in &variants {
                let got = GradientSynthesizer::with_opts(opts.clone())
                    .render_raster(&spec(pattern), &noise(), &target)
                    .unwrap();
                assert_eq!(got, expected, "{pattern} with {opts:?}");
            }
        }
    }

    #[test]
    fn zero_sized_partitions_are_rejected() {
        let target = RasterTarget::new(8, 8, ImageFormat::Png);
        for opts in [
            RasterOpts {
                rows_per_chunk: 0,
                ..RasterOpts::default()
            },
            RasterOpts {
                threads: Some(0),
                ..RasterOpts::default()
            },
        ] {
            let err = GradientSynthesizer::with_opts(opts)
                .render_raster(&spec(Pattern::Linear), &NoiseSpec::disabled(), &target)
                .unwrap_err();
            assert!(matches!(err, gradient_synth::GradientError::InvalidTarget(_)));
        }
    }
}
