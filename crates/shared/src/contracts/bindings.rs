// Interface of the deployed Web3RSVP contract, limited to what this client calls.
use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Web3RSVP {
        event NewEventCreated(
            bytes32 eventID,
            address creatorAddress,
            uint256 eventTimestamp,
            uint256 maxCapacity,
            uint256 deposit,
            string eventCost,
            string eventDataCID
        );

        function createNewEvent(
            uint256 eventTimestamp,
            uint256 deposit,
            uint256 maxCapacity,
            string calldata eventCost,
            string calldata eventDataCID
        ) external;
    }
}
