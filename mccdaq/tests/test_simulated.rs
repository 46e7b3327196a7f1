//! Test cases for the SimulatedBoard.

use measurements::{Temperature, test_utils::almost_eq};
use rstest::*;

use mccdaq::{
    AiChanType, AnalogInputMode, ChannelSetting, DaqDriver, DaqError, DigitalPortType, DriverCall,
    ErrorCode, SimulatedBoard, TInOptions, TempScale, UlRange,
};

/// Create a simulated USB-2416-4AO at board number 0.
#[fixture]
fn board() -> SimulatedBoard {
    SimulatedBoard::new(0, "USB-2416-4AO")
}

#[rstest]
fn test_board_name(board: SimulatedBoard) {
    let mut drv = board.clone();
    assert_eq!(drv.board_name().unwrap(), "USB-2416-4AO");
    assert_eq!(drv.board_num(), 0);
}

/// An absent board reports the bad board error code for every call.
#[rstest]
fn test_absent_board() {
    let mut drv = SimulatedBoard::absent(2);
    match drv.board_name() {
        Err(DaqError::Driver { code, .. }) => assert_eq!(code, ErrorCode::BAD_BOARD),
        _ => panic!("Expected a driver error"),
    }
    assert!(drv.flash_led().unwrap_err().is_board_not_found());
    assert!(drv.a_in_32(0, UlRange::Bip10Volts).unwrap_err().is_board_not_found());
}

#[rstest]
fn test_flash_led(board: SimulatedBoard) {
    let mut drv = board.clone();
    drv.flash_led().unwrap();
    drv.flash_led().unwrap();
    assert_eq!(board.led_flashes(), 2);
}

#[rstest]
fn test_set_config(board: SimulatedBoard) {
    let mut drv = board.clone();
    assert!(board.channel_config(3).is_none());

    drv.set_config(3, ChannelSetting::ChanType(AiChanType::Thermocouple))
        .unwrap();
    drv.set_config(3, ChannelSetting::DataRate(60)).unwrap();
    drv.a_chan_input_mode(3, AnalogInputMode::SingleEnded)
        .unwrap();

    let config = board.channel_config(3).unwrap();
    assert_eq!(config.chan_type, AiChanType::Thermocouple);
    assert_eq!(config.data_rate, 60);
    assert_eq!(config.input_mode, AnalogInputMode::SingleEnded);
    assert_eq!(board.calls().iter().filter(|c| c.is_configuration()).count(), 3);
}

#[rstest]
#[case(32)]
#[case(100)]
fn test_analog_channel_out_of_range(board: SimulatedBoard, #[case] channel: usize) {
    let mut drv = board.clone();
    match drv.a_in_32(channel, UlRange::Bip20Volts) {
        Err(DaqError::ChannelIndexOutOfRange { idx, nof_channels }) => {
            assert_eq!(idx, channel);
            assert_eq!(nof_channels, 32);
        }
        _ => panic!("Expected ChannelIndexOutOfRange error"),
    }
    assert!(board.calls().is_empty());
}

/// Voltages are quantized by the 24 bit A/D converter.
#[rstest]
#[case(UlRange::Bip20Volts, 3.3)]
#[case(UlRange::Bip10Volts, -7.25)]
#[case(UlRange::Bip2Pt5Volts, 0.001)]
fn test_voltage_quantization(#[case] range: UlRange, #[case] volts: f64) {
    let board = SimulatedBoard::new(0, "USB-2416").with_voltage(1, volts);
    let mut drv = board.clone();
    let read = drv.v_in_32(1, range).unwrap();
    assert!((read - volts).abs() <= range.resolution(24) / 2.0);
}

/// Voltages outside of the range clip at the ends of the range.
#[rstest]
fn test_voltage_clipping() {
    let board = SimulatedBoard::new(0, "USB-2416").with_voltage(0, 12.0);
    let mut drv = board.clone();
    let range = UlRange::Bip10Volts;
    assert_eq!(
        drv.v_in_32(0, range).unwrap(),
        range.high() - range.resolution(24)
    );
}

#[rstest]
fn test_voltage_sequence() {
    let board = SimulatedBoard::new(0, "USB-2416").with_sequence(4, vec![1.0, 2.0]);
    let mut drv = board.clone();
    let range = UlRange::Bip20Volts;
    assert!(almost_eq(drv.v_in_32(4, range).unwrap(), 1.0));
    assert!(almost_eq(drv.v_in_32(4, range).unwrap(), 2.0));
    assert!(almost_eq(drv.v_in_32(4, range).unwrap(), 2.0));
    assert_eq!(board.samples_taken(4), 3);
    assert_eq!(board.samples_taken(5), 0);
}

#[rstest]
fn test_thermocouple_read() {
    let board =
        SimulatedBoard::new(0, "USB-2416").with_temperature(2, Temperature::from_celsius(25.0));
    let mut drv = board.clone();
    drv.set_config(2, ChannelSetting::ChanType(AiChanType::Thermocouple))
        .unwrap();

    let celsius = drv.t_in(2, TempScale::Celsius, TInOptions::NoFilter).unwrap();
    assert!(almost_eq(celsius, 25.0));
    let fahrenheit = drv
        .t_in(2, TempScale::Fahrenheit, TInOptions::NoFilter)
        .unwrap();
    assert!(almost_eq(fahrenheit, 77.0));
}

#[rstest]
fn test_thermocouple_misconfigured(board: SimulatedBoard) {
    let mut drv = board.clone();
    match drv.t_in(0, TempScale::Celsius, TInOptions::NoFilter) {
        Err(DaqError::ChannelMisconfigured {
            channel,
            expected,
            actual,
        }) => {
            assert_eq!(channel, 0);
            assert_eq!(expected, AiChanType::Thermocouple);
            assert_eq!(actual, AiChanType::Voltage);
        }
        _ => panic!("Expected ChannelMisconfigured error"),
    }
}

#[rstest]
fn test_thermocouple_open(board: SimulatedBoard) {
    let mut drv = board.clone();
    drv.set_config(5, ChannelSetting::ChanType(AiChanType::Thermocouple))
        .unwrap();
    assert!(matches!(
        drv.t_in(5, TempScale::Celsius, TInOptions::NoFilter),
        Err(DaqError::OpenThermocouple { channel: 5 })
    ));
}

#[rstest]
fn test_analog_out_read_back(board: SimulatedBoard) {
    let mut drv = board.clone();
    let range = UlRange::Bip10Volts;
    let counts = drv.from_eng_units(range, 9.6059).unwrap();
    drv.a_out(1, range, counts).unwrap();

    assert_eq!(board.analog_output(1), Some(counts));
    let volts = board.analog_output_volts(1).unwrap();
    assert!((volts - 9.6059).abs() <= range.resolution(16));
    assert_eq!(drv.to_eng_units(range, counts).unwrap(), volts);
}

#[rstest]
fn test_analog_out_channel_out_of_range() {
    let board = SimulatedBoard::new(0, "USB-2416").with_channel_counts(32, 0, 2);
    let mut drv = board.clone();
    assert!(matches!(
        drv.a_out(0, UlRange::Bip10Volts, 0),
        Err(DaqError::ChannelIndexOutOfRange {
            idx: 0,
            nof_channels: 0
        })
    ));
}

#[rstest]
fn test_digital_port(board: SimulatedBoard) {
    let mut drv = board.clone();
    let port = DigitalPortType::FirstPortA;
    drv.d_out(port, 0b1010_0000).unwrap();
    assert_eq!(drv.d_in(port).unwrap(), 0b1010_0000);

    drv.d_bit_out(port, 0, true).unwrap();
    drv.d_bit_out(port, 7, false).unwrap();
    assert_eq!(board.digital_port(port), 0b0010_0001);

    assert!(drv.d_out(port, 256).is_err());
    assert!(drv.d_bit_out(port, 8, true).is_err());
}

#[rstest]
fn test_digital_port_driven_externally(board: SimulatedBoard) {
    let mut drv = board.clone();
    board.set_digital_port(DigitalPortType::FirstPortA, 0x81);
    assert_eq!(drv.d_in(DigitalPortType::FirstPortA).unwrap(), 0x81);
}

/// Rising edges on DIO0 increment counter 0.
#[rstest]
fn test_counter_counts_dio0_edges(board: SimulatedBoard) {
    let mut drv = board.clone();
    let port = DigitalPortType::FirstPortA;
    drv.c_clear(0).unwrap();
    for _ in 0..10 {
        drv.d_bit_out(port, 0, true).unwrap();
        drv.d_bit_out(port, 0, false).unwrap();
    }
    // setting a bit that is already set is not an edge
    drv.d_bit_out(port, 0, true).unwrap();
    drv.d_bit_out(port, 0, true).unwrap();
    assert_eq!(drv.c_in_32(0).unwrap(), 11);
    assert_eq!(drv.c_in_32(1).unwrap(), 0);

    drv.c_clear(0).unwrap();
    assert_eq!(board.counter(0), Some(0));
    assert!(drv.c_in_32(2).is_err());
}

#[rstest]
fn test_scan_interleaved() {
    let board = SimulatedBoard::new(0, "USB-2408")
        .with_sequence(0, vec![1.0, 2.0, 3.0])
        .with_voltage(1, -1.0)
        .with_temperature(2, Temperature::from_celsius(100.0));
    let mut drv = board.clone();
    drv.set_config(2, ChannelSetting::ChanType(AiChanType::Thermocouple))
        .unwrap();
    drv.set_config(2, ChannelSetting::TempScale(TempScale::Fahrenheit))
        .unwrap();
    drv.set_config(3, ChannelSetting::ChanType(AiChanType::Thermocouple))
        .unwrap();

    let data = drv.a_in_scan(0, 3, 12, 10, UlRange::Bip10Volts).unwrap();
    assert_eq!(data.len(), 12);
    for (row, exp_ch0) in data.chunks(4).zip([1.0, 2.0, 3.0]) {
        assert!(almost_eq(row[0], exp_ch0));
        assert!(almost_eq(row[1], -1.0));
        assert!(almost_eq(row[2], 212.0));
        assert_eq!(row[3], -9999.0);
    }
}

#[rstest]
#[case(2, 1, 4, 10)]
#[case(0, 3, 10, 10)]
#[case(0, 3, 0, 10)]
#[case(0, 3, 8, 0)]
#[case(0, 32, 33, 10)]
fn test_scan_invalid(
    board: SimulatedBoard,
    #[case] low: usize,
    #[case] high: usize,
    #[case] count: usize,
    #[case] rate: u32,
) {
    let mut drv = board.clone();
    assert!(drv.a_in_scan(low, high, count, rate, UlRange::Bip10Volts).is_err());
    assert!(board.calls().is_empty());
}

#[rstest]
fn test_release(board: SimulatedBoard) {
    let mut drv = board.clone();
    assert!(!board.is_released());
    drv.release().unwrap();
    assert!(board.is_released());
    assert_eq!(board.calls().last(), Some(&DriverCall::Release));
}
